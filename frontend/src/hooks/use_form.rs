use std::rc::Rc;

use shared::{FormField, FormState};
use yew::prelude::*;

/// Reducer wrapper so a [`FormState`] can live in `use_reducer`
#[derive(Debug, Clone, PartialEq)]
pub struct FormModel<F: FormField>(pub FormState<F>);

pub enum FormAction<F: FormField> {
    Change(F, String),
    Blur(F),
    ValidateAll,
    Replace(FormState<F>),
}

impl<F: FormField> Reducible for FormModel<F> {
    type Action = FormAction<F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut form = self.0.clone();
        match action {
            FormAction::Change(field, value) => form.change(field, value),
            FormAction::Blur(field) => form.blur(field),
            FormAction::ValidateAll => {
                form.validate_all();
            }
            FormAction::Replace(next) => form = next,
        }
        Rc::new(FormModel(form))
    }
}

pub struct UseFormResult<F: FormField> {
    pub form: FormState<F>,
    pub actions: UseFormActions<F>,
}

#[derive(Clone, PartialEq)]
pub struct UseFormActions<F: FormField> {
    pub on_change: Callback<(F, String)>,
    pub on_blur: Callback<F>,
    /// Marks every field touched; returns whether the form may be submitted
    pub validate_all: Callback<(), bool>,
    pub replace: Callback<FormState<F>>,
}

#[hook]
pub fn use_form<F, I>(init: I) -> UseFormResult<F>
where
    F: FormField,
    I: FnOnce() -> FormState<F>,
{
    let model = use_reducer(move || FormModel(init()));

    let on_change = {
        let model = model.clone();
        use_callback((), move |(field, value): (F, String), _| {
            model.dispatch(FormAction::Change(field, value));
        })
    };

    let on_blur = {
        let model = model.clone();
        use_callback((), move |field: F, _| model.dispatch(FormAction::Blur(field)))
    };

    let validate_all = {
        let model = model.clone();
        Callback::from(move |_: ()| {
            let mut check = model.0.clone();
            let valid = check.validate_all();
            model.dispatch(FormAction::ValidateAll);
            valid
        })
    };

    let replace = {
        let model = model.clone();
        use_callback((), move |next: FormState<F>, _| model.dispatch(FormAction::Replace(next)))
    };

    UseFormResult {
        form: model.0.clone(),
        actions: UseFormActions {
            on_change,
            on_blur,
            validate_all,
            replace,
        },
    }
}
