use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod content;
mod countdown;
mod error;
mod links;
mod reveal;
mod components {
    pub mod animated_section;
    pub mod carnation;
}
mod pages {
    pub mod invitation;
}

use pages::invitation::Invitation;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering invitation");
            html! { <Invitation /> }
        }
        Route::NotFound => {
            info!("Unknown path, redirecting to the invitation");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting invitation");
    yew::Renderer::<App>::new().render();
}
