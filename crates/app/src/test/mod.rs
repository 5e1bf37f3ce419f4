//! Shared test doubles and database fixtures.

mod memory;

pub(crate) use db::TestDb;
pub(crate) use memory::InMemoryCouponsRepository;
