//! Controller layer: form and list state machines driving the reservation API.

pub mod events;
pub mod form;
pub mod list;
pub mod navigation;
pub mod validation;

pub use events::{UiError, UiErrorContext};
pub use form::{FormMode, FormState, ReservationForm, SubmitOutcome};
pub use list::ReservationList;
pub use navigation::{ChannelNavigator, Navigator, Route, ScheduledNavigation};
pub use validation::{validate, Clock, LocalClock, ValidationErrors};

#[cfg(test)]
#[path = "tests/support.rs"]
mod support;
