pub mod dsa;
pub mod optical_network;

pub use dsa::bitset::BitSet;
pub use optical_network::*;
