//! Explore feed: the signed-in user's uploads, newest first.
//!
//! SYSTEM CONTEXT
//! ==============
//! The feed is requested only after hydration reports `Ready`, because the
//! query needs the profile's user id.

use leptos::prelude::*;
use session::Video;

use crate::components::readiness_gate::ReadinessGate;
use crate::components::sidebar::Sidebar;
use crate::components::video_card::VideoCard;
use crate::util::auth::use_session_hydration;

#[component]
pub fn ExplorePage() -> impl IntoView {
    let (readiness, retry) = use_session_hydration();
    let videos = RwSignal::new(None::<Result<Vec<Video>, String>>);

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;
        use session::guard::LOGIN_PATH;
        use session::{Readiness, VideoQuery};

        use crate::state::session::use_session;
        use crate::util::auth::request_error_message;

        let ctx = use_session();
        let navigate = use_navigate();
        Effect::new(move || {
            if readiness.get() != Readiness::Ready {
                return;
            }
            let gateway = ctx.gateway();
            let Some(user_id) = gateway.session().snapshot().current_user().map(|user| user.id.clone()) else {
                return;
            };
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = match gateway.list_videos(&VideoQuery::newest_for(user_id)).await {
                    Ok(list) => Ok(list),
                    Err(err) => {
                        tracing::warn!(error = %err, "video feed request failed");
                        if err.is_unauthorized() {
                            navigate(LOGIN_PATH, NavigateOptions::default());
                        }
                        Err(request_error_message(&err).to_owned())
                    }
                };
                let _ = videos.try_set(Some(outcome));
            });
        });
    }
    let feed = move || match videos.get() {
        None => view! { <p class="feed__status">"Loading..."</p> }.into_any(),
        Some(Err(message)) => view! { <p class="feed__error">{message}</p> }.into_any(),
        Some(Ok(list)) if list.is_empty() => {
            view! { <p class="feed__status">"No videos uploaded yet."</p> }.into_any()
        }
        Some(Ok(list)) => view! {
            <div class="feed__grid">
                {list
                    .into_iter()
                    .map(|video| {
                        view! {
                            <VideoCard
                                id=video.id
                                title=video.title
                                thumbnail=video.thumbnail
                                views=video.views
                                duration=video.duration
                            />
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    };

    view! {
        <Sidebar>
            <ReadinessGate readiness retry>
                <section class="feed">
                    <h1 class="feed__title">"Your Videos"</h1>
                    {feed}
                </section>
            </ReadinessGate>
        </Sidebar>
    }
}
