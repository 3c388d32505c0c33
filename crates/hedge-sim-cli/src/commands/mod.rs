pub mod lot_table;
pub mod record;
pub mod sensitivity;
pub mod simulate;
