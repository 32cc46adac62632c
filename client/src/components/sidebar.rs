//! Navigation chrome for signed-in pages, including logout.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::{NavigateOptions, hooks::use_navigate};
#[cfg(feature = "hydrate")]
use session::guard::LOGIN_PATH;

use crate::state::session::use_session;
use crate::util::format::initial;

#[component]
pub fn Sidebar(children: Children) -> impl IntoView {
    let ctx = use_session();
    let session = ctx.state();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        notice.set(None);

        #[cfg(feature = "hydrate")]
        {
            let gateway = ctx.gateway();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = gateway.logout().await;
                if !gateway.session().is_authenticated() {
                    navigate(LOGIN_PATH, NavigateOptions::default());
                }
                if let Err(failure) = result {
                    let _ = notice.try_set(Some(failure.user_message()));
                }
                let _ = busy.try_set(false);
            });
        }
    };

    let username = move || session.get().current_user().map(|user| user.username.clone()).unwrap_or_default();
    let avatar = move || session.get().current_user().map(|user| user.avatar_url.clone()).unwrap_or_default();

    view! {
        <div class="layout">
            <nav class="sidebar">
                <a class="sidebar__brand" href="/explore">"VidSync"</a>
                <a class="sidebar__link" href="/explore">"Explore"</a>
                <a class="sidebar__link" href="/profile">"Profile"</a>
                <div class="sidebar__user">
                    <Show
                        when=move || !avatar().is_empty()
                        fallback=move || view! { <span class="sidebar__initial">{move || initial(&username())}</span> }
                    >
                        <img class="sidebar__avatar" src=avatar alt=username/>
                    </Show>
                    <span class="sidebar__name">{username}</span>
                </div>
                <button class="sidebar__logout" on:click=on_logout disabled=move || busy.get()>
                    "Log out"
                </button>
                <Show when=move || notice.get().is_some()>
                    <p class="sidebar__notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
            </nav>
            <main class="layout__main">{children()}</main>
        </div>
    }
}
