//! Public landing page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session;
use crate::util::auth::install_route_guard;

#[component]
pub fn HomePage() -> impl IntoView {
    install_route_guard(use_session().state(), use_navigate());

    view! {
        <div class="home-page">
            <h1>"VidSync"</h1>
            <p class="home-page__tagline">"Watch, share and keep track of the videos you love."</p>
            <div class="home-page__actions">
                <a class="button" href="/login">"Log in"</a>
                <a class="button button--outline" href="/signup">"Sign up"</a>
            </div>
        </div>
    }
}
