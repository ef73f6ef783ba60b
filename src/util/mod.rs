pub mod due;
