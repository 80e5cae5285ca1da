use crate::util::bytes::Bytes;

/// Get the total memory of the system in bytes.
///
/// This is used to derive the maximum heap size. Some systems report zero when the
/// probe is not supported, and we treat that as unknown.
pub fn get_system_total_memory() -> Option<Bytes> {
    use sysinfo::MemoryRefreshKind;
    use sysinfo::{RefreshKind, System};

    // Only load the memory component. Loading everything (e.g. `System::new_all()`) takes a
    // long time, and we probe during startup.
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    let total = Bytes::new(sys.total_memory());
    trace!("Probed system total memory: {:?}", total);
    total.non_zero()
}
