use dioxus::prelude::*;

use crate::domain::entities::video::{parse_tags, Video, VideoEdit};

/// Builds the edit from the raw form fields. `None` when the title is blank.
pub fn edit_from_form(title: &str, description: &str, tags_input: &str) -> Option<VideoEdit> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(VideoEdit {
        title: title.to_string(),
        description: description.trim().to_string(),
        tags: parse_tags(tags_input),
    })
}

#[component]
pub fn EditVideoModal(
    video: Video,
    on_cancel: EventHandler<()>,
    on_save: EventHandler<VideoEdit>,
) -> Element {
    let initial = VideoEdit::from_video(&video);
    let initial_title = initial.title.clone();
    let initial_description = initial.description.clone();
    let initial_tags = initial.tags_input();
    let mut title = use_signal(move || initial_title);
    let mut description = use_signal(move || initial_description);
    let mut tags_input = use_signal(move || initial_tags);
    let mut error = use_signal(|| None::<String>);

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1000;",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "background: #fff; border-radius: 10px; padding: 20px; width: 480px; max-width: 90vw; display: flex; flex-direction: column; gap: 12px; box-shadow: 0 10px 24px rgba(0,0,0,0.2);",
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin: 0;", "編輯影片資訊" }
                label {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    "標題"
                    input {
                        value: "{title}",
                        oninput: move |event| title.set(event.value()),
                    }
                }
                label {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    "描述"
                    textarea {
                        rows: "4",
                        value: "{description}",
                        oninput: move |event| description.set(event.value()),
                    }
                }
                label {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    "標籤"
                    input {
                        placeholder: "以逗號分隔，例如：教育, 科技",
                        value: "{tags_input}",
                        oninput: move |event| tags_input.set(event.value()),
                    }
                }
                if let Some(message) = error() {
                    p { style: "margin: 0; color: #e03131;", "{message}" }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button { onclick: move |_| on_cancel.call(()), "取消" }
                    button {
                        onclick: move |_| {
                            match edit_from_form(&title(), &description(), &tags_input()) {
                                Some(edit) => on_save.call(edit),
                                None => error.set(Some("標題不可為空".to_string())),
                            }
                        },
                        "儲存"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_from_form_trims_and_splits_tags() {
        let edit = edit_from_form("  新標題 ", " 說明 ", "教育, ,科技").expect("valid form");

        assert_eq!(edit.title, "新標題");
        assert_eq!(edit.description, "說明");
        assert_eq!(edit.tags, vec!["教育", "科技"]);
    }

    #[test]
    fn edit_from_form_rejects_blank_title() {
        assert_eq!(edit_from_form("   ", "desc", "a"), None);
    }
}
