//! Asynchronous region generation with a configurable thread pool.
//!
//! Offloads pipeline execution to background threads, supports cancellation,
//! and delivers completed regions via bounded channels. Each worker runs the
//! shared pipeline synchronously for one region at a time; regions are
//! independent, so no locking is needed beyond the channels themselves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use grotto_facet::{FacetSet, Pipeline};
use grotto_region::Region3;

/// A fully generated region ready for downstream consumption.
#[derive(Debug)]
pub struct GeneratedRegion {
    /// The region matching the original submission.
    pub region: Region3,
    /// All facets the pipeline produced for the region.
    pub facets: FacetSet,
    /// Generation time in microseconds (for profiling).
    pub generation_time_us: u64,
}

/// Internal wrapper that carries a queued region and its cancellation flag.
struct QueuedRegion {
    region: Region3,
    cancelled: Arc<AtomicBool>,
}

/// Manages asynchronous region generation across a thread pool.
pub struct AsyncRegionGenerator {
    /// Sender for submitting regions.
    task_sender: Sender<QueuedRegion>,
    /// Receiver for collecting completed regions on the caller's thread.
    result_receiver: Receiver<GeneratedRegion>,
    /// Shared cancellation flag per queued region.
    active_tasks: Arc<DashMap<Region3, Arc<AtomicBool>>>,
    /// Current number of in-flight regions.
    in_flight: Arc<AtomicU64>,
}

impl AsyncRegionGenerator {
    /// Create a new async generator with the specified thread count and queue capacity.
    ///
    /// # Arguments
    /// - `pipeline`: The validated provider pipeline shared by all workers.
    /// - `thread_count`: Number of worker threads. Typically `num_cpus - 2` to
    ///   leave headroom for the caller's threads.
    /// - `max_concurrent`: Maximum in-flight regions. Excess submissions are rejected.
    /// - `result_capacity`: Bounded channel capacity for completed regions.
    pub fn new(
        pipeline: Arc<Pipeline>,
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<QueuedRegion>(max_concurrent * 2);
        let (result_sender, result_receiver) = bounded::<GeneratedRegion>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let pipeline = Arc::clone(&pipeline);

            std::thread::Builder::new()
                .name("region-gen-worker".into())
                .spawn(move || {
                    while let Ok(queued) = receiver.recv() {
                        // Check cancellation before starting work.
                        if queued.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        match pipeline.generate(queued.region) {
                            Ok(facets) => {
                                let elapsed = start.elapsed().as_micros() as u64;
                                // Check cancellation after generation.
                                if !queued.cancelled.load(Ordering::Relaxed) {
                                    let _ = sender.send(GeneratedRegion {
                                        region: queued.region,
                                        facets,
                                        generation_time_us: elapsed,
                                    });
                                }
                            }
                            Err(err) => {
                                tracing::error!(
                                    region = ?queued.region,
                                    %err,
                                    "region generation failed"
                                );
                            }
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("Failed to spawn region generation worker thread");
        }

        Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Create a generator with a sensible default thread count based on CPU cores.
    pub fn with_defaults(pipeline: Arc<Pipeline>) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 2).max(1);
        Self::new(pipeline, threads, 64, 128)
    }

    /// Submit a region for background generation.
    ///
    /// Returns `Ok(())` if the region was queued, or `Err(region)` if the
    /// queue is full.
    pub fn submit(&self, region: Region3) -> Result<(), Region3> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(region, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let queued = QueuedRegion { region, cancelled };
        self.task_sender.try_send(queued).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            let rejected = e.into_inner().region;
            self.active_tasks.remove(&rejected);
            rejected
        })
    }

    /// Cancel a pending or in-progress region.
    ///
    /// If generation has already completed, this is a no-op.
    pub fn cancel(&self, region: &Region3) {
        if let Some((_, cancelled)) = self.active_tasks.remove(region) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all completed regions from the result channel.
    pub fn drain_results(&self) -> Vec<GeneratedRegion> {
        let mut results = Vec::new();
        while let Ok(generated) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&generated.region);
            results.push(generated);
        }
        results
    }

    /// Number of regions currently in flight (queued or executing).
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if the given region is currently pending.
    pub fn is_pending(&self, region: &Region3) -> bool {
        self.active_tasks.contains_key(region)
    }
}
