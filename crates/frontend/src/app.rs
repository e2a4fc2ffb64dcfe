use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::pipeline::store::ResultsCache;
use crate::routes::AppRoutes;
use crate::shared::auth::{self, AppContext};
use crate::shared::notifications::NotificationService;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);
    provide_context(NotificationService::new());
    provide_context(ResultsCache::new());

    // a restored token is only trusted once the profile loads
    Effect::new(move |_| {
        let Ok(token) = ctx.require_token() else {
            return;
        };
        if ctx.user.with(|u| u.is_some()) {
            return;
        }
        spawn_local(async move {
            match auth::fetch_me(&token).await {
                Ok(me) => ctx.user.set(Some(me)),
                Err(err) => ctx.handle_api_error(&err),
            }
        });
    });

    view! { <AppRoutes /> }
}
