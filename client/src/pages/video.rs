//! Video player page. Loads the video, then counts the view.

use leptos::prelude::*;
use session::VideoDetail;

use crate::components::readiness_gate::ReadinessGate;
use crate::components::sidebar::Sidebar;
use crate::util::auth::use_session_hydration;
use crate::util::format::{format_date, format_number};

#[component]
pub fn VideoPage() -> impl IntoView {
    let (readiness, retry) = use_session_hydration();
    let detail = RwSignal::new(None::<Result<VideoDetail, String>>);

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::{use_navigate, use_params_map};
        use session::Readiness;
        use session::guard::LOGIN_PATH;

        use crate::state::session::use_session;
        use crate::util::auth::request_error_message;

        let ctx = use_session();
        let navigate = use_navigate();
        let params = use_params_map();
        Effect::new(move || {
            let id = params.read().get("id").unwrap_or_default();
            if readiness.get() != Readiness::Ready || id.is_empty() {
                return;
            }
            detail.set(None);
            let gateway = ctx.gateway();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match gateway.video(&id).await {
                    Ok(video) => {
                        let _ = detail.try_set(Some(Ok(video)));
                        if let Err(err) = gateway.record_view(&id).await {
                            tracing::warn!(error = %err, video_id = %id, "failed to record view");
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, video_id = %id, "video request failed");
                        if err.is_unauthorized() {
                            navigate(LOGIN_PATH, NavigateOptions::default());
                        }
                        let _ = detail.try_set(Some(Err(request_error_message(&err).to_owned())));
                    }
                }
            });
        });
    }
    let player = move || match detail.get() {
        None => view! { <div class="player player--loading">"Loading..."</div> }.into_any(),
        Some(Err(message)) => view! { <p class="player__error">{message}</p> }.into_any(),
        Some(Ok(video)) => view! {
            <div class="player">
                <video class="player__video" src=video.video_file poster=video.thumbnail controls=true></video>
                <h1 class="player__title">{video.title}</h1>
                <p class="player__meta">
                    <span>{format_date(&video.created_at).to_owned()}</span>
                    <span>{format!("{} views", format_number(video.views))}</span>
                </p>
                <p class="player__description">{video.description}</p>
            </div>
        }
        .into_any(),
    };

    view! {
        <Sidebar>
            <ReadinessGate readiness retry>
                {player}
            </ReadinessGate>
        </Sidebar>
    }
}
