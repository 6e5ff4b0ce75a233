//! The `skillscope member` subcommands.

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use skillscope_core::model::MemberId;

use crate::store_file;

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member with default scores
    Add,

    /// Remove a member
    Remove {
        /// Member id
        id: u32,
    },

    /// Rename a member
    Rename {
        /// Member id
        id: u32,
        /// New display name
        name: String,
    },

    /// Replace a member's memo
    Memo {
        /// Member id
        id: u32,
        /// Memo text
        text: String,
    },

    /// Move a member to a new position (0-based)
    Reorder {
        /// Member id
        id: u32,
        /// Target index
        index: usize,
    },

    /// Toggle a member's inclusion in charts
    Select {
        /// Member id
        id: u32,
    },
}

pub fn execute(store_path: &Path, action: MemberAction) -> Result<()> {
    let mut store = store_file::load(store_path)?;

    match action {
        MemberAction::Add => {
            let id = store.add_member();
            let member = store.member(id).expect("member was just added");
            println!("Added {} (id {id})", member.name);
        }
        MemberAction::Remove { id } => {
            store.remove_member(MemberId(id));
            println!("Removed member {id}");
        }
        MemberAction::Rename { id, name } => {
            store.rename_member(MemberId(id), &name);
            println!("Renamed member {id} to {name}");
        }
        MemberAction::Memo { id, text } => {
            store.update_memo(MemberId(id), &text);
            println!("Updated memo for member {id}");
        }
        MemberAction::Reorder { id, index } => {
            store.reorder(MemberId(id), index);
            println!("Moved member {id} to position {index}");
        }
        MemberAction::Select { id } => {
            store.toggle_selection(MemberId(id));
            let state = if store.is_selected(MemberId(id)) {
                "selected"
            } else {
                "deselected"
            };
            println!("Member {id} {state}");
        }
    }

    store_file::save(&store, store_path)
}
