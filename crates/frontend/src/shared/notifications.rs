//! Transient notification tray provided through context.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DISMISS_AFTER_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    notices: RwSignal<Vec<Notification>>,
    next_id: RwSignal<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn notices(&self) -> RwSignal<Vec<Notification>> {
        self.notices
    }

    fn show(&self, kind: NotificationKind, message: impl Into<String>) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);
        let notices = self.notices;
        notices.update(|list| {
            list.push(Notification {
                id,
                kind,
                message: message.into(),
            })
        });
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            notices.update(|list| list.retain(|n| n.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NotificationKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(NotificationKind::Info, message);
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn NotificationTray() -> impl IntoView {
    let service = use_context::<NotificationService>().unwrap_or_default();
    let notices = service.notices();

    view! {
        <div style="position: fixed; top: 16px; right: 16px; z-index: 1000; display: flex; flex-direction: column; gap: 8px;">
            {move || {
                notices
                    .get()
                    .into_iter()
                    .map(|n| {
                        let background = match n.kind {
                            NotificationKind::Success => "#16a34a",
                            NotificationKind::Error => "#dc2626",
                            NotificationKind::Info => "#2563eb",
                        };
                        view! {
                            <div style=format!(
                                "color: white; padding: 10px 14px; border-radius: 6px; box-shadow: 0 2px 8px rgba(0,0,0,0.25); max-width: 360px; background: {};",
                                background,
                            )>{n.message}</div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
