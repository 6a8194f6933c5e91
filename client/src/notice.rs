use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use pinroute_shared::notice::NOTICE_TTL_MS;
use pinroute_shared::{NoticeBoard, NoticeLevel};

use crate::app::Notices;

/// Post a transient notice and schedule its dismissal.
pub(crate) fn raise_notice(
    notices: RwSignal<NoticeBoard>,
    level: NoticeLevel,
    message: impl Into<String>,
) {
    let mut id = 0;
    notices.update(|board| id = board.raise(level, message, chrono::Utc::now()));
    schedule_dismiss(notices, id);
}

pub(crate) fn schedule_dismiss(notices: RwSignal<NoticeBoard>, id: u64) {
    Timeout::new(NOTICE_TTL_MS, move || {
        notices.update(|board| {
            board.dismiss(id);
            board.expire(chrono::Utc::now());
        });
    })
    .forget();
}

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let Notices(notices) = expect_context();

    view! {
        <div style="position: absolute; top: 72px; left: 50%; transform: translateX(-50%); z-index: 20; display: flex; flex-direction: column; gap: 8px; pointer-events: none;">
            {move || {
                notices
                    .get()
                    .active()
                    .iter()
                    .map(|notice| {
                        let id = notice.id;
                        let accent = match notice.level {
                            NoticeLevel::Info => "#3887be",
                            NoticeLevel::Warning => "#f5c542",
                        };
                        view! {
                            <div
                                class="notice"
                                role="alert"
                                style=format!("pointer-events: auto; min-width: 260px; max-width: 420px; padding: 10px 14px; background: #161921; border: 1px solid #282c3e; border-left: 3px solid {accent}; border-radius: 6px; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem; box-shadow: 0 4px 16px rgba(0,0,0,0.5); display: flex; align-items: center; gap: 10px;")
                            >
                                <span style="flex: 1;">{notice.message.clone()}</span>
                                <button
                                    title="Dismiss"
                                    style="background: none; border: none; color: #5a5860; cursor: pointer; font-size: 1rem; line-height: 1;"
                                    on:click=move |_| notices.update(|board| board.dismiss(id))
                                >
                                    "\u{00D7}"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
