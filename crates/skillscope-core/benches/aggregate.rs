use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skillscope_core::aggregate::{
    average, composite_axes, rank_by_score, team_stats, top_n, RankDirection,
};
use skillscope_core::competency::CompetencyKey;
use skillscope_core::model::{Member, MemberId, Scores};

fn make_team(size: u32) -> Vec<Member> {
    (1..=size)
        .map(|i| {
            let mut member = Member::new(
                MemberId(i),
                format!("Member {i}"),
                "#4e79a7".to_string(),
            );
            member.scores = CompetencyKey::ALL
                .iter()
                .enumerate()
                .map(|(k, &key)| (key, ((i as usize + k) % 5 + 1) as u8))
                .collect();
            member
        })
        .collect()
}

fn bench_average(c: &mut Criterion) {
    let scores = Scores::uniform(3);
    c.bench_function("average", |b| b.iter(|| average(black_box(&scores))));
}

fn bench_ranking(c: &mut Criterion) {
    let scores: Scores = CompetencyKey::ALL
        .iter()
        .enumerate()
        .map(|(i, &k)| (k, (i % 5 + 1) as u8))
        .collect();
    c.bench_function("rank_by_score", |b| {
        b.iter(|| rank_by_score(black_box(&scores)))
    });
    c.bench_function("composite_axes", |b| {
        b.iter(|| composite_axes(black_box(&scores)))
    });
}

fn bench_team_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("team_stats");

    for size in [5u32, 50, 500] {
        let team = make_team(size);
        group.bench_function(format!("members={size}"), |b| {
            b.iter(|| team_stats(black_box(&team)))
        });
    }

    let team = make_team(50);
    let stats = team_stats(&team).unwrap();
    group.bench_function("top_n", |b| {
        b.iter(|| top_n(black_box(&stats), 3, RankDirection::Strengths))
    });

    group.finish();
}

criterion_group!(benches, bench_average, bench_ranking, bench_team_stats);
criterion_main!(benches);
