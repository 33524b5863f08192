pub mod elements;
pub mod function;
pub mod object;
pub mod property;
pub mod string;
pub mod symbols;
pub mod value;
