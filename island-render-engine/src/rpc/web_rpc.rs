use bevy::prelude::*;
use constants::links::LinkTarget;
use constants::navigation::{CameraZone, NAVIGATION_OPTIONS, options_excluding};
use serde::{Deserialize, Serialize};

use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::session::ResetSessionRequest;
use crate::engine::scene::camera_registry::CameraRegistry;
use crate::engine::scene::outlines::PreselectZone;
use crate::engine::scene::selection::SelectionState;
use crate::interaction::links::OpenLinkRequest;
use crate::ui::overlay::OverlayAnchor;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        use crate::engine::core::app_state::FrameSet;

        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (publish_state_notifications, send_outgoing_messages)
                    .chain()
                    .after(FrameSet::Presentation),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Keep the listener alive for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Thread-safe message queue filled by the browser `message` listener.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Side effects a request asks for, turned into events by `handle_rpc_messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RpcCommand {
    Preselect(Option<usize>),
    ResetSession,
}

/// Store access for request handlers.
struct RpcContext<'a> {
    cameras: &'a mut CameraRegistry,
    selection: &'a SelectionState,
    progress: &'a LoadingProgress,
    commands: Vec<RpcCommand>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut cameras: ResMut<CameraRegistry>,
    selection: Res<SelectionState>,
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut preselect: EventWriter<PreselectZone>,
    mut reset: EventWriter<ResetSessionRequest>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let mut context = RpcContext {
            cameras: &mut cameras,
            selection: &selection,
            progress: &progress,
            commands: Vec::new(),
        };
        if let Some(response) = handle_rpc_request(&request, &mut context) {
            rpc_interface.queue_response(response);
        }
        for command in context.commands {
            match command {
                RpcCommand::Preselect(index) => {
                    preselect.write(PreselectZone(index));
                }
                RpcCommand::ResetSession => {
                    reset.write(ResetSessionRequest);
                }
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
/// Requests without an id are executed but not answered.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    if request.jsonrpc != "2.0" {
        return request.id.clone().map(|id| {
            create_error_response(id, -32600, "Invalid request", None)
        });
    }

    let result = match request.method.as_str() {
        "set_camera_index" => handle_set_camera_index(&request.params, context),
        "get_navigation_options" => Ok(navigation_options(context.cameras)),
        "get_scene_state" => Ok(scene_state(context)),
        "camera_grid_hover_start" => handle_grid_hover_start(&request.params, context),
        "camera_grid_hover_end" => {
            context.commands.push(RpcCommand::Preselect(None));
            Ok(serde_json::json!({ "success": true }))
        }
        "reset_session" => {
            context.commands.push(RpcCommand::ResetSession);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

#[derive(Deserialize)]
struct CameraIndexParams {
    index: usize,
}

fn handle_set_camera_index(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let parsed = serde_json::from_value::<CameraIndexParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;

    if !context.cameras.set_active_index(parsed.index) {
        return Err(RpcError::invalid_params(&format!(
            "No camera at index {} ({} loaded)",
            parsed.index,
            context.cameras.len()
        )));
    }

    Ok(serde_json::json!({
        "success": true,
        "index": parsed.index
    }))
}

fn handle_grid_hover_start(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let parsed = serde_json::from_value::<CameraIndexParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;
    if CameraZone::from_index(parsed.index).is_none() {
        return Err(RpcError::invalid_params(&format!(
            "Unknown camera index {}",
            parsed.index
        )));
    }
    context.commands.push(RpcCommand::Preselect(Some(parsed.index)));
    Ok(serde_json::json!({ "success": true }))
}

fn navigation_options(cameras: &CameraRegistry) -> serde_json::Value {
    let current = cameras.active_index();
    serde_json::json!({
        "current": current,
        "cameras_loaded": cameras.len(),
        "options": NAVIGATION_OPTIONS,
        "available": options_excluding(current).collect::<Vec<_>>(),
    })
}

fn scene_state(context: &RpcContext) -> serde_json::Value {
    serde_json::json!({
        "camera_index": context.cameras.active_index(),
        "zone": context.cameras.zone(),
        "tree_contents_visible": context.selection.tree_contents_visible(),
        "current_tree_content": context.selection.current_tree_content(),
        "hovered_workshop_content": context.selection.hovered_workshop_content(),
        "loading": context.progress,
    })
}

fn link_target_name(target: LinkTarget) -> &'static str {
    match target {
        LinkTarget::SameTab => "_self",
        LinkTarget::NewTab => "_blank",
    }
}

/// Values last pushed to the host page.
#[derive(Default)]
struct PublishedState {
    camera_index: Option<usize>,
    selection: Option<SelectionState>,
    progress_fraction: Option<f32>,
}

/// Push store changes to the host page as notifications.
fn publish_state_notifications(
    cameras: Res<CameraRegistry>,
    selection: Res<SelectionState>,
    progress: Res<LoadingProgress>,
    anchor: Res<OverlayAnchor>,
    mut links: EventReader<OpenLinkRequest>,
    mut published: Local<PublishedState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if published.camera_index != Some(cameras.active_index()) && cameras.active().is_some() {
        published.camera_index = Some(cameras.active_index());
        rpc_interface.send_notification(
            "camera_changed",
            serde_json::json!({
                "index": cameras.active_index(),
                "zone": cameras.zone(),
                "available": options_excluding(cameras.active_index()).collect::<Vec<_>>(),
            }),
        );
    }

    let previous = published.selection.take().unwrap_or_default();
    if previous.hovered_workshop_content() != selection.hovered_workshop_content() {
        rpc_interface.send_notification(
            "hovered_workshop_content",
            serde_json::json!({ "id": selection.hovered_workshop_content() }),
        );
    }
    if previous.tree_contents_visible() != selection.tree_contents_visible()
        || previous.current_tree_content() != selection.current_tree_content()
    {
        rpc_interface.send_notification(
            "tree_content_changed",
            serde_json::json!({
                "visible": selection.tree_contents_visible(),
                "current": selection.current_tree_content(),
            }),
        );
    }
    published.selection = Some(selection.clone());

    let fraction = progress.fraction();
    if published.progress_fraction != Some(fraction) {
        published.progress_fraction = Some(fraction);
        rpc_interface.send_notification(
            "loading_progress",
            serde_json::json!({
                "fraction": fraction,
                "settled": progress.is_settled(),
                "failures": progress.failures(),
            }),
        );
    }

    for link in links.read() {
        rpc_interface.send_notification(
            "open_link",
            serde_json::json!({
                "url": link.url,
                "target": link_target_name(link.target),
            }),
        );
    }

    if anchor.is_changed() {
        rpc_interface.send_notification("overlay_anchor", anchor.to_json());
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
