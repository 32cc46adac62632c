//! Profile of the signed-in user, rendered from the hydrated session.

use leptos::prelude::*;
use session::UserProfile;

use crate::components::readiness_gate::ReadinessGate;
use crate::components::sidebar::Sidebar;
use crate::state::session::use_session;
use crate::util::auth::use_session_hydration;
use crate::util::format::{format_date, initial};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session().state();
    let (readiness, retry) = use_session_hydration();
    let profile = move || session.get().current_user().cloned();

    view! {
        <Sidebar>
            <ReadinessGate readiness retry>
                {move || profile().map(|user| view! { <ProfileDetails user/> })}
            </ReadinessGate>
        </Sidebar>
    }
}

#[component]
fn ProfileDetails(user: UserProfile) -> impl IntoView {
    let watched = user.watch_history.len();
    let avatar_fallback = initial(&user.username);
    let has_avatar = !user.avatar_url.is_empty();
    let history = user
        .watch_history
        .iter()
        .rev()
        .enumerate()
        .map(|(index, video_id)| {
            view! {
                <li class="profile__history-item">
                    <a href=format!("/video/{video_id}")>{format!("Watched video {}", index + 1)}</a>
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="profile">
            {user.cover_image_url.clone().map(|src| view! { <img class="profile__cover" src=src alt="Cover image"/> })}
            <header class="profile__header">
                {if has_avatar {
                    view! { <img class="profile__avatar" src=user.avatar_url.clone() alt=user.username.clone()/> }
                        .into_any()
                } else {
                    view! { <span class="profile__avatar profile__avatar--fallback">{avatar_fallback}</span> }
                        .into_any()
                }}
                <div>
                    <h1 class="profile__name">{user.full_name.clone()}</h1>
                    <p class="profile__meta">
                        <span>{format!("@{}", user.username)}</span>
                        <span>{user.email.clone()}</span>
                        <span>{format!("{watched} views")}</span>
                        <span>{format!("Joined {}", format_date(&user.created_at))}</span>
                    </p>
                </div>
            </header>
            <h2 class="profile__section">"Watch History"</h2>
            {if watched > 0 {
                view! { <ul class="profile__history">{history}</ul> }.into_any()
            } else {
                view! { <p class="profile__empty">"No watch history available."</p> }.into_any()
            }}
        </section>
    }
}
