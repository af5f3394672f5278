/// Raw triples generated per topology run
pub const DEFAULT_NUM_TRIPLES: usize = 30_000;
/// Stage-2 cutoff: a location is jammed when its vehicle total exceeds this
pub const DEFAULT_THRESHOLD: i64 = 100;

/// Centralized bus slot count
pub const DEFAULT_CENTRAL_CAPACITY: usize = 100;
/// Sleep paid by the centralized consumer before storing each triple
pub const DEFAULT_CENTRAL_DELAY_MS: u64 = 1_000;
/// Memory ballast held by the centralized consumer
pub const DEFAULT_CENTRAL_MEMORY_MB: usize = 500;
pub const DEFAULT_CENTRAL_POLL_MS: u64 = 1;

pub const DEFAULT_WORKER_BATCH_SIZE: usize = 15_000;
pub const DEFAULT_MASTER_BATCH_SIZE: usize = 60_000;
pub const DEFAULT_DISTRIBUTED_POLL_MS: u64 = 5;

/// Poll intervals shorter than this are raised to it
pub const MIN_POLL_INTERVAL_MS: u64 = 1;
/// `--distrib-bus` value meaning an unlimited bus
pub const UNLIMITED_CAPACITY_FLAG: i64 = -1;
pub const BYTES_PER_MB: usize = 1024 * 1024;
