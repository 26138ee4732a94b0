// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers for each command.
//
// Rules for this layer:
//   - No network math here
//   - No printing (that's Layer 1); progress goes to tracing
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// Settings shared by every command that touches the network
pub mod network;

// Dataset assembly + evaluation
pub mod evaluate_use_case;

// Fresh network directory
pub mod init_use_case;

// Embedding export
pub mod export_use_case;
