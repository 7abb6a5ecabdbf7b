//! An ordered set backed by a red-black tree
//!
//! Nodes are stored in a slab and linked by index, so the parent links used while rebalancing
//! never own anything.

mod slab;
mod error;
pub mod tree;

pub use error::InvariantError;
pub use tree::RBTree;

#[macro_export(local_inner_macros)]
macro_rules! rbtree {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(rbtree!(@single $rest)),*]));

    ($($value:expr,)+) => { rbtree!($($value),+) };
    ($($value:expr),*) => {
        {
            let _cap = rbtree!(@count $($value),*);
            let mut _tree = $crate::RBTree::with_capacity(_cap);
            $(
                let _ = _tree.insert($value);
            )*
            _tree
        }
    };
}
