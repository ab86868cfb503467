// Order lifecycle state machine
//
// Transition rules are pure. Persistence of the append-only history lives in
// `models::order_status`; the coordinator ties the two together inside one
// transaction.

pub mod errors;
pub mod order_state_machine;
pub mod states;

pub use errors::{TransitionError, TransitionResult};
pub use order_state_machine::{
    OrderStateMachine, GENERIC_STATUS_DESCRIPTION, ORDER_CREATED_DESCRIPTION,
};
pub use states::OrderStatus;
