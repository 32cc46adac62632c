//! Feed card linking to a video's player page.

use leptos::prelude::*;

use crate::util::format::{format_duration, format_number};

#[component]
pub fn VideoCard(id: String, title: String, thumbnail: String, views: u64, duration: f64) -> impl IntoView {
    let href = format!("/video/{id}");
    let alt = title.clone();

    view! {
        <a class="video-card" href=href>
            <span class="video-card__thumb">
                <img src=thumbnail alt=alt loading="lazy"/>
                <span class="video-card__duration">{format_duration(duration)}</span>
            </span>
            <span class="video-card__title">{title}</span>
            <span class="video-card__views">{format!("{} views", format_number(views))}</span>
        </a>
    }
}
