mod workbook;

pub use workbook::{Row, Sheet, Workbook};
