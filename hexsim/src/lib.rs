//! Snapshot-file driver around [`hexsim_core`]: loads a JSON world snapshot,
//! runs turns, persists the mutated snapshot back.

pub mod loader;

pub use loader::{load_snapshot, save_snapshot, LoadedSnapshot, SnapshotError};
