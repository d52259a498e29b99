//! Zellij plugin wrapper and entry point.
//!
//! The thin binding layer between the library widget and Zellij: it turns
//! keys, web request results and pipe messages into [`Event`]s, runs
//! [`handle_event`], and carries out the returned [`Action`]s with Zellij's
//! host functions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: `WebAccess` for the listing and content endpoints
//! 3. **Start**: Once permissions are granted, issue the first listing fetch
//! 4. **Update**: Keys and web request results go through `handle_event`
//! 5. **Pipe**: `complete.fileupload` refreshes the list
//! 6. **Render**: Draw the current view model
//!
//! # Web Requests
//!
//! Every request carries a context map so its result can be routed back:
//!
//! - `kind = listing`, `generation = <n>`: a page fetch
//! - `kind = delete`, `batch = <n>`, `path = /p/<id>`: one content removal
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up` (or `Ctrl+n`/`Ctrl+p`): Move cursor
//! - `Space`: Check row, `a`: Check all, `d`/`Delete`: Remove checked
//! - `s`: Toggle sort, `n`: Newest first, `o`: Oldest first
//! - `]`/`l`/`Right`, `[`/`h`/`Left`: Next/previous page, `1`-`9`: Jump to page
//! - `/`: Filter, `u`: Add content, `q`/`Esc`: Close
//!
//! Filter mode:
//! - Characters and `Backspace` edit the filter
//! - `Enter`: Keep filter, `Esc`: Clear filter

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use mylibrary::app::FilterKey;
use mylibrary::library::{DeletionBatch, DELETE_OPERATION_BODY};
use mylibrary::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Pipe message a sibling upload widget sends after an upload.
const UPLOAD_COMPLETE_PIPE: &str = "complete.fileupload";

/// Message that opens the add-content widget.
const ADD_CONTENT_MESSAGE: &str = "newaddcontent";

const CONTEXT_KIND: &str = "kind";
const KIND_LISTING: &str = "listing";
const KIND_DELETE: &str = "delete";

/// Plugin state wrapper.
struct State {
    app: mylibrary::AppState,

    base_url: String,

    /// The removal currently waiting for per-path results.
    deletion: Option<DeletionBatch>,

    /// Identifies removal batches so late results of an old one are ignored.
    next_batch: u64,

    started: bool,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: mylibrary::initialize(&default_config),
            base_url: default_config.base_url,
            deletion: None,
            next_batch: 0,
            started: false,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        mylibrary::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            base_url = %config.base_url,
            owner = ?config.owner_id,
            viewer = %config.viewer_id,
            "parsed configuration"
        );
        self.app = mylibrary::initialize(&config);
        self.base_url.clone_from(&config.base_url);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::WebAccess,
            PermissionType::MessageAndLaunchOtherPlugins,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match self.map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match self.map_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        tracing::debug!(name = %pipe_message.name, "pipe message");
        if pipe_message.name == UPLOAD_COMPLETE_PIPE {
            return self.dispatch(&Event::UploadCompleted);
        }
        false
    }

    fn render(&mut self, rows: usize, cols: usize) {
        mylibrary::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_permission_result(&mut self, permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted if !self.started => {
                tracing::debug!("permissions granted - loading library");
                self.started = true;
                Some(Event::Start)
            }
            PermissionStatus::Granted => None,
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - library cannot be loaded");
                None
            }
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode == InputMode::Filter {
            return Some(match key.bare_key {
                BareKey::Esc => Event::ClearFilter,
                BareKey::Enter | BareKey::Down | BareKey::Up => Event::ExitFilter,
                BareKey::Backspace => Event::FilterKey(FilterKey::Backspace),
                BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::FilterKey(FilterKey::Char(c)),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char(' ') => Event::ToggleRow,
            BareKey::Char('a') => Event::ToggleSelectAll,
            BareKey::Char('d') | BareKey::Delete => Event::RemoveSelected,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('n') => Event::ChangeSort("lastModified_desc".to_string()),
            BareKey::Char('o') => Event::ChangeSort("lastModified_asc".to_string()),
            BareKey::Right | BareKey::Char(']' | 'l') => Event::NextPage,
            BareKey::Left | BareKey::Char('[' | 'h') => Event::PrevPage,
            BareKey::Char(c @ '1'..='9') => Event::ChangePage(c.to_digit(10).map_or(1, |d| d as usize)),
            BareKey::Char('/') => Event::FilterMode,
            BareKey::Char('u') => Event::AddContent,
            _ => return None,
        })
    }

    /// Routes a web request result back to the fetch or removal it belongs to.
    fn map_web_result(&mut self, status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        match context.get(CONTEXT_KIND).map(String::as_str) {
            Some(KIND_LISTING) => {
                let generation = context.get("generation")?.parse().ok()?;
                Some(Event::ListingReceived { generation, status, body })
            }
            Some(KIND_DELETE) => {
                let batch_id: u64 = context.get("batch")?.parse().ok()?;
                let path = context.get("path")?;
                let batch = self.deletion.as_mut().filter(|b| b.id() == batch_id)?;

                let success = (200..300).contains(&status);
                if !success {
                    tracing::warn!(path = %path, status, "content removal failed");
                }
                let all_succeeded = batch.record(path, success)?;
                self.deletion = None;
                Some(Event::DeleteCompleted { success: all_succeeded })
            }
            other => {
                tracing::debug!(kind = ?other, "ignoring web request result without context");
                None
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchLibrary(request) => {
                let url = request.url(&self.base_url);
                tracing::debug!(url = %url, "requesting library page");

                let mut context = BTreeMap::new();
                context.insert(CONTEXT_KIND.to_string(), KIND_LISTING.to_string());
                context.insert("generation".to_string(), request.generation.to_string());
                web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), context);
            }
            Action::DeleteContent { paths } => {
                self.next_batch += 1;
                let batch_id = self.next_batch;
                self.deletion = Some(DeletionBatch::new(batch_id, paths));

                let mut headers = BTreeMap::new();
                headers.insert(
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                );

                for path in paths {
                    let url = mylibrary::infrastructure::join_url(&self.base_url, path);
                    let mut context = BTreeMap::new();
                    context.insert(CONTEXT_KIND.to_string(), KIND_DELETE.to_string());
                    context.insert("batch".to_string(), batch_id.to_string());
                    context.insert("path".to_string(), path.clone());
                    web_request(
                        url,
                        HttpVerb::Post,
                        headers.clone(),
                        DELETE_OPERATION_BODY.as_bytes().to_vec(),
                        context,
                    );
                }
            }
            Action::OpenAddContent => {
                tracing::debug!("opening add content widget");
                pipe_message_to_plugin(MessageToPlugin::new(ADD_CONTENT_MESSAGE));
            }
        }
    }
}
