//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    explore::ExplorePage, home::HomePage, login::LoginPage, profile::ProfilePage, signup::SignupPage,
    video::VideoPage,
};
use crate::state::session::SessionContext;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session from cookies once per page load and provides it to
/// every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    SessionContext::from_browser().provide();

    view! {
        <Stylesheet id="leptos" href="/pkg/vidsync.css"/>
        <Title text="VidSync"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("explore") view=ExplorePage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
                <Route path=(StaticSegment("video"), ParamSegment("id")) view=VideoPage/>
            </Routes>
        </Router>
    }
}
