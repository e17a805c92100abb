//! Red-black tree node model, algorithms, iteration and container API.

mod algo;
mod check;
mod erase;
mod insert;
mod iter;
mod node;
mod search;
#[allow(clippy::module_inception)]
mod tree;


pub use iter::{Cursor, Iter, Position, Range};
pub use node::Color;
pub use tree::{MapTree, RbTree, SetTree};
