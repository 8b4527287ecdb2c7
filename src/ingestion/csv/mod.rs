mod routemap;

pub use routemap::*;
