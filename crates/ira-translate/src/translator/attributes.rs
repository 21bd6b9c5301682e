use super::TranslationContext;
use ira_core::ir::{AttributeMap, OpInfo};
use ira_core::legacy::OpDesc;
use tracing::{trace, warn};

impl<'a> TranslationContext<'a> {
    /// Attribute map of `op` keyed by target slot name.
    ///
    /// Missing or unconvertible legacy attributes are kept as empty entries.
    pub(crate) fn resolve_attributes(&mut self, op: &OpDesc, info: &OpInfo) -> AttributeMap {
        let tables = self.tables;
        let mut attributes = AttributeMap::new();
        for slot in &info.schema.attributes {
            let legacy_name = tables.compat.legacy_attr_name(op.op_type(), &slot.name);
            let converted = tables.attributes.translate(slot.ty, op.attr(&legacy_name));
            match &converted {
                Some(attr) => trace!("[{}] attribute {} = {}", op.op_type(), slot.name, attr),
                None => {
                    warn!("empty attribute in {} name: {}", op.op_type(), slot.name);
                    self.stats.empty_attributes += 1;
                }
            }
            attributes.insert(slot.name.clone(), converted);
        }
        attributes
    }
}
