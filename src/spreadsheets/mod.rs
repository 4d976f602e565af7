pub mod caprates_xlsx;

pub use caprates_xlsx::export_caprates_xlsx;
