//! The two LED tools offered to the model.

use std::sync::Arc;

use serde_json::Value;

use super::tool::{AgentTool, Tool};
use super::types::AgentToolParameters;
use crate::device::DeviceClient;

pub const GET_LED_STATUS: &str = "get_led_status";
pub const CHANGE_LED_STATUS: &str = "change_led_status";

const GET_LED_STATUS_DESCRIPTION: &str =
    "Returns the current status of LEDs. No argument is required for this function.";

const CHANGE_LED_STATUS_DESCRIPTION: &str = "Turns a LED on or off depending on request and \
     returns the status response after execution. `led_number` is the selected LED number; \
     `led_on` is true to turn the LED ON and false to turn it OFF.";

/// Build the tool registry backed by `client`.
///
/// Both tools return the device's message (or a rendered failure) as a JSON
/// string, so the model always receives text.
pub fn led_tools(client: DeviceClient) -> Vec<Arc<dyn Tool>> {
    let status_client = client.clone();
    let get_status = AgentTool::new(
        GET_LED_STATUS,
        GET_LED_STATUS_DESCRIPTION,
        AgentToolParameters::empty(),
        move |_args| {
            let client = status_client.clone();
            async move { Ok(Value::String(client.get_status().await)) }
        },
    );

    let change_status = AgentTool::new(
        CHANGE_LED_STATUS,
        CHANGE_LED_STATUS_DESCRIPTION,
        AgentToolParameters::object()
            .integer("led_number", "The selected LED number", true)
            .boolean(
                "led_on",
                "true to turn the LED ON, false to turn it OFF",
                true,
            )
            .build(),
        move |args| {
            let client = client.clone();
            async move {
                let led_number = args.get_i64("led_number")?;
                let led_on = args.get_bool("led_on")?;
                Ok(Value::String(client.set_status(led_number, led_on).await))
            }
        },
    );

    vec![Arc::new(get_status), Arc::new(change_status)]
}
