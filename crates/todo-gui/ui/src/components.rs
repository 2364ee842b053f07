mod todo_row;

pub use todo_row::TodoRow;
