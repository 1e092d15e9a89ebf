//! Systems operating on the registry.
//!
//! Each system is a set of free functions borrowing the registry, so they
//! compose without owning any state of their own.

pub mod allocation;
pub mod reallocation;
pub mod reporting;

pub use allocation::{allocate_residence, allocate_workspace};
pub use reallocation::reallocate;
pub use reporting::{
    all_allocations, persons_in_room, render_allocations, unallocated, PersonEntry,
    RoomAllocation, UnallocatedReport,
};
