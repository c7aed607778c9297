//! dnsinv-inventory: TXT record decoding and inventory assembly
//!
//! Turns normalized DNS TXT records such as
//! `hostname=tomcat.example.com;groups=tomcat,webserver` and
//! `group=webserver;vars=foo_var:foo` into an Ansible dynamic inventory.

pub mod assemble;
pub mod error;
pub mod fields;
pub mod record;
pub mod types;
pub mod value;

pub use assemble::{Assembler, Assembly, DecodeMode, assemble, build_inventory};
pub use error::{DecodeIssue, InventoryError};
pub use fields::{FieldMap, decode};
pub use record::{DecodedRecord, GroupRecord, HostRecord, IgnoreReason, Record};
pub use types::{GroupEntry, Inventory, Meta, UNGROUPED, Variables};
pub use value::{VarList, VariableValue, parse_var_list};
