// per node media channel capabilities, a node can carry a channel only when its width
// is a whole number of the node's slots within the node's min/max slot count.
// an incompatible node is an ordinary outcome of path search, so it is a `false` plus a diagnostic

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use tracing::warn;

use super::decimal::{format_decimal, require_positive};
use super::error::{Result, SpectrumError};

pub trait DiagnosticSink {
    fn report(&mut self,message:&str);
}

#[derive(Clone,Copy,Debug,Default)]
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    fn report(&mut self,_message:&str) {}
}

// forwards every diagnostic to the `tracing` subscriber at warn level
#[derive(Clone,Copy,Debug,Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self,message:&str) {
        warn!("{message}");
    }
}

#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct CollectingSink {
    pub messages:Vec<String>
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self,message:&str) {
        self.messages.push(message.to_string());
    }
}

impl<F:FnMut(&str)> DiagnosticSink for F {
    fn report(&mut self,message:&str) {
        self(message)
    }
}

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct McCapability {
    node_label:String,
    slot_granularity_ghz:BigRational,
    min_slots:u64,
    max_slots:u64
}

impl McCapability {
    pub fn new(node_label:impl Into<String>,slot_granularity_ghz:BigRational,min_slots:u64,max_slots:u64) -> Result<Self> {
        let node_label = node_label.into();
        require_positive(&slot_granularity_ghz,"slot granularity")?;
        if min_slots > max_slots {
            return Err(SpectrumError::invalid_argument(
                format!("node {node_label}: min slots {min_slots} is above max slots {max_slots}")
            ));
        }
        Ok(Self {node_label,slot_granularity_ghz,min_slots,max_slots})
    }
    pub fn node_label(&self) -> &str {
        &self.node_label
    }
    pub fn slot_granularity_ghz(&self) -> &BigRational {
        &self.slot_granularity_ghz
    }
    pub fn min_slots(&self) -> u64 {
        self.min_slots
    }
    pub fn max_slots(&self) -> u64 {
        self.max_slots
    }

    fn width_for(&self,slots:u64) -> BigRational {
        &self.slot_granularity_ghz * BigRational::from_integer(BigInt::from(slots))
    }

    // width range this node can carry, "a GHz" when min == max
    fn supported_widths(&self) -> String {
        let min = format_decimal(&self.width_for(self.min_slots));
        if self.min_slots == self.max_slots {
            return format!("{min} GHz");
        }
        format!("{min} GHz to {} GHz",format_decimal(&self.width_for(self.max_slots)))
    }

    pub fn is_compatible(&self,required_width_ghz:&BigRational,sink:&mut dyn DiagnosticSink) -> bool {
        let quotient = (required_width_ghz / &self.slot_granularity_ghz).floor();
        let remainder = required_width_ghz - &quotient * &self.slot_granularity_ghz;
        let quotient = quotient.to_integer();
        let compatible = remainder.is_zero()
            && quotient >= BigInt::from(self.min_slots)
            && quotient <= BigInt::from(self.max_slots);
        if !compatible {
            sink.report(&format!(
                "node {} cannot carry a {} GHz channel: slot granularity {} GHz, min slots {}, max slots {}, supported width {}",
                self.node_label,
                format_decimal(required_width_ghz),
                format_decimal(&self.slot_granularity_ghz),
                self.min_slots,
                self.max_slots,
                self.supported_widths()
            ));
        }
        compatible
    }
}

// the capabilities of every node along one path, duplicates are dropped
#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct McCapabilities {
    capabilities:Vec<McCapability>
}

impl McCapabilities {
    pub fn new() -> Self {
        Self {capabilities:vec![]}
    }
    pub fn add(&mut self,capability:McCapability) -> bool {
        if self.capabilities.contains(&capability) {
            return false;
        }
        self.capabilities.push(capability);
        true
    }
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &McCapability> {
        self.capabilities.iter()
    }

    // every node is asked, even after one failed, so each failure gets its diagnostic
    pub fn is_compatible_width(&self,width_ghz:&BigRational,sink:&mut dyn DiagnosticSink) -> bool {
        self.capabilities.iter()
            .fold(true,|all,capability| capability.is_compatible(width_ghz, sink) && all)
    }

    pub fn is_compatible_service(&self,slot_granularity_ghz:&BigRational,slot_count:u64,sink:&mut dyn DiagnosticSink) -> bool {
        let width = slot_granularity_ghz * BigRational::from_integer(BigInt::from(slot_count));
        self.is_compatible_width(&width, sink)
    }
}

impl FromIterator<McCapability> for McCapabilities {
    fn from_iter<T: IntoIterator<Item = McCapability>>(iter: T) -> Self {
        let mut capabilities = Self::new();
        for capability in iter {
            capabilities.add(capability);
        }
        capabilities
    }
}
