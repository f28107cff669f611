use bevy::prelude::*;
use constants::links::LinkTarget;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct OpenLinkRequest {
    pub url: String,
    pub target: LinkTarget,
}

pub fn open_links(mut requests: EventReader<OpenLinkRequest>) {
    for request in requests.read() {
        info!("Opening link {} ({:?})", request.url, request.target);
        navigate(request);
    }
}

#[cfg(target_arch = "wasm32")]
fn navigate(request: &OpenLinkRequest) {
    let Some(window) = web_sys::window() else {
        error!("Window object not available");
        return;
    };
    let result = match request.target {
        LinkTarget::NewTab => window
            .open_with_url_and_target(&request.url, "_blank")
            .map(|_| ()),
        // The engine usually runs in an iframe; navigate the top-level page.
        LinkTarget::SameTab => {
            let top = window.top().ok().flatten().unwrap_or(window);
            top.location().set_href(&request.url)
        }
    };
    if let Err(e) = result {
        error!("Failed to open {}: {:?}", request.url, e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn navigate(_request: &OpenLinkRequest) {
    // No browser to navigate on native targets.
}
