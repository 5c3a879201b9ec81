use shared::export::run_export;
use shared::format::today;
use shared::{ExportFormat, Transaction};
use yew::prelude::*;

use crate::components::toast::use_toaster;
use crate::services::download::BrowserDownloader;

#[derive(Properties, PartialEq)]
pub struct ExportMenuProps {
    /// Rows to export, in display order
    pub transactions: Vec<Transaction>,
    /// Filename prefix, e.g. `transactions`
    pub prefix: AttrValue,
}

#[function_component(ExportMenu)]
pub fn export_menu(props: &ExportMenuProps) -> Html {
    let toaster = use_toaster();

    let button = |format: ExportFormat| {
        let toaster = toaster.clone();
        let transactions = props.transactions.clone();
        let prefix = props.prefix.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            let notice = run_export(format, &transactions, &prefix, today(), &BrowserDownloader);
            toaster.notify(notice);
        });
        html! {
            <button type="button" class="btn btn-outline" {onclick}>
                {format!("Export {}", format.label())}
            </button>
        }
    };

    html! {
        <div class="export-menu">
            {button(ExportFormat::Csv)}
            {button(ExportFormat::Spreadsheet)}
        </div>
    }
}
