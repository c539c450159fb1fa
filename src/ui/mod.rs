/// UI layer: side filter panel, top bar, and the results table.
pub mod panels;
pub mod table;
