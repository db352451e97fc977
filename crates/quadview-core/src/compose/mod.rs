pub mod opacity;
