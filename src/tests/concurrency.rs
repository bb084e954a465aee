// Parallel producers: independent slots never interleave their
// fields, and every started record is delivered exactly once.

use std::thread;

use super::recorder_with_sink;
use crate::field::{FieldIter, FieldValue};
use crate::level::LogLevel;

#[test]
fn parallel_records_stay_internally_ordered() {
    let (recorder, sink) = recorder_with_sink();

    const THREADS: u64 = 8;
    const RECORDS_PER_THREAD: u64 = 50;

    let mut workers = Vec::new();
    for t in 0..THREADS {
        workers.push(thread::spawn(move || {
            for i in 0..RECORDS_PER_THREAD {
                let base = t * 10_000 + i;
                let handle = recorder.start_record("CONC", LogLevel::Info).unwrap();
                recorder.log(&handle, FieldValue::U64(base));
                recorder.log(&handle, FieldValue::U64(base + 1));
                recorder.log(&handle, FieldValue::U64(base + 2));
                recorder.stop_record(handle);
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    let records = sink.for_context("CONC");
    assert_eq!(records.len(), (THREADS * RECORDS_PER_THREAD) as usize);

    for record in &records {
        let fields: Vec<FieldValue<'_>> = FieldIter::new(&record.payload).collect();
        let FieldValue::U64(base) = fields[0] else {
            panic!("unexpected field {:?}", fields[0]);
        };
        assert_eq!(
            fields,
            [
                FieldValue::U64(base),
                FieldValue::U64(base + 1),
                FieldValue::U64(base + 2),
            ]
        );
    }
}

#[test]
fn concurrent_exhaustion_only_ever_rejects() {
    let (recorder, sink) = recorder_with_sink();

    // More threads than slots, each holding its slot briefly. Some
    // starts may be rejected; none may block or corrupt the pool.
    const THREADS: usize = 48;
    let mut workers = Vec::new();
    for _ in 0..THREADS {
        workers.push(thread::spawn(move || {
            match recorder.start_record("BRST", LogLevel::Info) {
                Some(handle) => {
                    recorder.log(&handle, FieldValue::Bool(true));
                    recorder.stop_record(handle);
                    true
                }
                None => false,
            }
        }));
    }

    let delivered = workers
        .into_iter()
        .map(|w| w.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(sink.for_context("BRST").len(), delivered);
    assert_eq!(delivered + recorder.rejected_count(), THREADS);
    assert_eq!(recorder.active_slots(), 0);
}

#[test]
fn global_recorder_is_one_instance_across_threads() {
    let first = crate::runtime::recorder() as *const _;
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| crate::runtime::recorder() as *const _ as usize))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first as usize);
    }
}
