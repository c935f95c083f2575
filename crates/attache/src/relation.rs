mod belongs_to;
pub use belongs_to::BelongsTo;
