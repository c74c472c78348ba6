pub mod node;
pub mod values;

pub use node::{NodeType, NodeValues};
pub use values::{
    HttpValues, JuicityValues, Socks5Values, SsValues, SsrValues, TrojanValues, TuicValues,
    V2rayValues, VlessValues,
};
