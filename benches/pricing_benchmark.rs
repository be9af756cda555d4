use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::sync::Arc;
use std::thread;
use stay_pricing::{
    resolve_active_catalog, BookingRequest, Catalog, Hotel, PricingEngine, RoomType,
    SettingsConfig, SettingsStore,
};

// Concurrent quoting against a shared global catalog, as request handlers would do
pub fn pricing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stay_pricing");

    for hotels_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(hotels_count),
            hotels_count,
            |b, &hotels_count| {
                let settings = Arc::new(SettingsStore::new(SettingsConfig {
                    settings_file: None,
                    snapshot_global_on_create: false,
                }));

                // Every third hotel carries its own catalog
                let hotels = Arc::new(
                    (0..hotels_count)
                        .map(|i| {
                            let hotel = Hotel::new(
                                &format!("hotel{}", i),
                                "Benchmark Hotel",
                                "Chennai",
                                1000.0 + i as f64,
                            );
                            if i % 3 == 0 {
                                hotel.with_override(Catalog::new(
                                    vec![
                                        RoomType::new("Double Room", 1.4, 2),
                                        RoomType::new("Suite", 3.0, 4),
                                    ],
                                    800.0,
                                ))
                            } else {
                                hotel
                            }
                        })
                        .collect::<Vec<_>>(),
                );

                let room_types = vec!["Double Room", "Suite"];
                let check_ins = (1..20)
                    .map(|i| format!("2025-06-{:02}", i))
                    .collect::<Vec<_>>();

                b.iter(|| {
                    let mut handles = vec![];
                    for _ in 0..4 {
                        let settings = Arc::clone(&settings);
                        let hotels = Arc::clone(&hotels);
                        let room_types = room_types.clone();
                        let check_ins = check_ins.clone();

                        handles.push(thread::spawn(move || {
                            let engine = PricingEngine::default();
                            let mut rng = thread_rng();
                            let mut total = 0.0;

                            for _ in 0..250 {
                                let hotel = hotels.choose(&mut rng).unwrap();
                                let check_in = check_ins.choose(&mut rng).unwrap();
                                let check_out = format!("2025-07-{:02}", rng.gen_range(1..28));
                                let request = BookingRequest::new(
                                    &hotel.id,
                                    check_in,
                                    &check_out,
                                    rng.gen_range(1..6),
                                    room_types.choose(&mut rng).unwrap(),
                                );

                                let global = settings.global();
                                let active =
                                    resolve_active_catalog(hotel, Some(global.value.as_ref()))
                                        .unwrap();
                                if let Ok(price) =
                                    engine.compute_price(hotel.base_price, active.catalog(), &request)
                                {
                                    total += price.total;
                                }
                            }
                            total
                        }));
                    }

                    let totals: f64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
                    black_box(totals)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, pricing_benchmark);
criterion_main!(benches);
