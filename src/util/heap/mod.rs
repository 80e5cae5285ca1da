mod accounting;
pub mod gc_trigger;
mod inputs;

pub use self::accounting::CollectionKind;
pub use self::accounting::TimingAccount;
pub use self::gc_trigger::GCTrigger;
pub use self::inputs::MemoryInputs;
pub use self::inputs::MemorySnapshot;
pub use self::inputs::RuntimeMemoryInputs;
