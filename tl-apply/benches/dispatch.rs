use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tl_apply::OutputDispatcher;
use tl_core::capability::{ActionSpace, CapabilityDescriptor};
use tl_core::names::{ACTION_OUTPUT, RECURRENT_OUTPUT};
use tl_core::{ActionRecord, AgentId, MemoryRecord, OutputTensor};

const BATCH: usize = 64;
const ACTION_LEN: usize = 8;
const MEMORY_LEN: usize = 32;

fn make_batch() -> (Vec<OutputTensor>, Vec<AgentId>) {
    // Representative non-constant payloads.
    let actions: Vec<f32> = (0..BATCH * ACTION_LEN)
        .map(|i| ((i % 17) as f32) * 0.1 - 0.8)
        .collect();
    let memories: Vec<f32> = (0..BATCH * MEMORY_LEN)
        .map(|i| ((i % 23) as f32) * 0.05)
        .collect();

    let tensors = vec![
        OutputTensor::from_rows(ACTION_OUTPUT, BATCH, ACTION_LEN, actions),
        OutputTensor::from_rows(RECURRENT_OUTPUT, BATCH, MEMORY_LEN, memories),
    ];
    let order: Vec<AgentId> = (0..BATCH as AgentId).collect();
    (tensors, order)
}

fn bench_continuous_cycle(c: &mut Criterion) {
    let desc = CapabilityDescriptor::new(ActionSpace::Continuous { size: ACTION_LEN });
    let mut d = OutputDispatcher::new(&desc, 0).unwrap();
    let (tensors, order) = make_batch();
    let mut actions = ActionRecord::default();
    let mut memories = MemoryRecord::default();

    c.bench_function("apply_all_continuous_64", |b| {
        b.iter(|| {
            d.apply_all(
                black_box(&tensors),
                black_box(&order),
                &mut actions,
                &mut memories,
            )
            .unwrap();
        })
    });
}

fn bench_discrete_cycle(c: &mut Criterion) {
    let desc = CapabilityDescriptor::new(ActionSpace::Discrete {
        branch_sizes: vec![3, 3, 2],
    });
    let mut d = OutputDispatcher::new(&desc, 7).unwrap();

    let logits: Vec<f32> = (0..BATCH * 8).map(|i| ((i % 11) as f32) * 0.2).collect();
    let tensors = vec![OutputTensor::from_rows(ACTION_OUTPUT, BATCH, 8, logits)];
    let order: Vec<AgentId> = (0..BATCH as AgentId).collect();
    let mut actions = ActionRecord::default();
    let mut memories = MemoryRecord::default();

    c.bench_function("apply_all_discrete_64", |b| {
        b.iter(|| {
            d.apply_all(
                black_box(&tensors),
                black_box(&order),
                &mut actions,
                &mut memories,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, bench_continuous_cycle, bench_discrete_cycle);
criterion_main!(benches);
