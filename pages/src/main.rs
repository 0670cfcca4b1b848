use journal_censor::Censor;
use web_sys::{wasm_bindgen::JsCast, window, HtmlInputElement, HtmlTextAreaElement, InputEvent};
use yew::{function_component, html, Callback, Html, TargetCast};

#[function_component(App)]
fn app() -> Html {
    let oninput = Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let uncensored = input.value();
            let document = window().unwrap().document().unwrap();
            let analysis_element = document.get_element_by_id("analysis").unwrap();
            let censored_element = document
                .get_element_by_id("censored")
                .unwrap()
                .dyn_into::<HtmlTextAreaElement>()
                .unwrap();
            if uncensored.is_empty() {
                analysis_element.set_inner_html("N/A");
                censored_element.set_value("");
            } else {
                let censored = Censor::default().censor_and_analyze(&uncensored);
                let tokens = censored
                    .redactions
                    .iter()
                    .map(|r| r.token.as_str())
                    .collect::<Vec<_>>();
                let result = format!(
                    "redacted = {}, skipped = {}, tokens = {tokens:?}",
                    censored.redactions.len(),
                    censored.rejections
                );
                analysis_element.set_text_content(Some(&result));
                censored_element.set_value(&censored.text);
            }
        }
    });
    html! {<>
        <h2>{"Journal censor"}</h2>
        <h3>{"Input"}</h3>
        <input
            class="form-control"
            {oninput}
            type="text"
            style="background-color: #2c3e50; color: white; border-width: 0;"
        />
        <h3>{"Analysis"}</h3>
        <p id="analysis">{"N/A"}</p>
        <h3>{"Output"}</h3>
        <textarea
            id="censored"
            class="form-control"
            rows="10"
            readonly={true}
            tabindex="-1"
            style="background-color: #2c3e50; resize: vertical; color: white; border-width: 0; user-select: none;"
        ></textarea>
    </>}
}

fn main() {
    yew::Renderer::<App>::new().render();
}
