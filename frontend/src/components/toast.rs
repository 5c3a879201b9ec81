use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::config::DEFAULT_TOAST_DURATION_MS;
use shared::Notice;
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u32,
    notice: Notice,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
}

enum ToastAction {
    Push(u32, Notice),
    Dismiss(u32),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut list = (*self).clone();
        match action {
            ToastAction::Push(id, notice) => list.toasts.push(Toast { id, notice }),
            ToastAction::Dismiss(id) => list.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(list)
    }
}

/// Handle for showing notices, provided by [`ToastProvider`]
#[derive(Clone, PartialEq)]
pub struct Toaster {
    notify: Callback<Notice>,
}

impl Toaster {
    pub fn notify(&self, notice: Notice) {
        self.notify.emit(notice);
    }
}

/// The nearest [`Toaster`]. Outside a provider notices only reach the log.
#[hook]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().unwrap_or_else(|| Toaster {
        notify: Callback::from(|notice: Notice| {
            Logger::warn_with_component("toast", &format!("No toast provider: {notice}"));
        }),
    })
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0u32);

    let toaster = {
        let list = list.clone();
        let notify = use_callback((), move |notice: Notice, _| {
            let id = {
                let mut next = next_id.borrow_mut();
                let id = *next;
                *next = next.wrapping_add(1);
                id
            };
            list.dispatch(ToastAction::Push(id, notice));

            let list = list.clone();
            Timeout::new(DEFAULT_TOAST_DURATION_MS, move || {
                list.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        });
        Toaster { notify }
    };

    html! {
        <ContextProvider<Toaster> context={toaster}>
            {props.children.clone()}
            <div class="toast-container">
                {for list.toasts.iter().map(|toast| {
                    let on_close = {
                        let list = list.clone();
                        let id = toast.id;
                        Callback::from(move |_: MouseEvent| list.dispatch(ToastAction::Dismiss(id)))
                    };
                    html! {
                        <div key={toast.id} class={classes!("toast", toast.notice.kind.css_class())}>
                            <span class="toast-message">{&toast.notice.message}</span>
                            <button class="toast-close" onclick={on_close}>{"×"}</button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<Toaster>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_removes_only_matching_toast() {
        let list = Rc::new(ToastList::default())
            .reduce(ToastAction::Push(0, Notice::success("Saved")))
            .reduce(ToastAction::Push(1, Notice::error("Failed")));
        assert_eq!(list.toasts.len(), 2);

        let list = list.reduce(ToastAction::Dismiss(0));
        assert_eq!(list.toasts.len(), 1);
        assert_eq!(list.toasts[0].notice, Notice::error("Failed"));
    }
}
