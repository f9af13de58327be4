use leptos::prelude::*;

use crate::components::chaos_game::ChaosGameCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-chaos-game">
				<ChaosGameCanvas />
				<div class="chaos-game-help">
					<h1>"Chaos Game"</h1>
					<p class="subtitle">
						"Hover a corner to see its weight. Drag to move it. Scroll to change the weight."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
