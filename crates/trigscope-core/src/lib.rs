//! Trigscope Core Types and Definitions
//!
//! This crate provides the foundational types for trigscope map graphs. It
//! includes:
//!
//! - **Identifiers**: Node identifiers with reserved variable prefixes ([`identifier::NodeId`])
//! - **Semantic**: Trigger, variable, edge and record types ([`semantic`] module)
//! - **Opcodes**: The externally supplied opcode definition table ([`opcode`] module)
//! - **Waypoints**: Bijective base-26 waypoint token decoding ([`waypoint`] module)

pub mod identifier;
pub mod opcode;
pub mod semantic;
pub mod waypoint;
