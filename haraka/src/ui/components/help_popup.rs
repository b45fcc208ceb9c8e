use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::i18n::Locale;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen, locale: &Locale) {
    let help_items = get_help_items(screen);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        locale.t("help.title"),
        theme::accent_border_style(),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            let description = if description.is_empty() {
                ""
            } else {
                locale.t(description)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(description.to_string()),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

/// Key labels with the translation key of what they do.
fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Dashboard(..) => {
            items.push(("↑/k ↓/j", "help.select"));
            items.push(("Enter/→/l", "help.view_fees"));
            items.push(("p", "help.pay"));
            items.push(("t", "help.history"));
            items.push(("a", "help.link"));
            items.push(("u", "help.unlink"));
            items.push(("s", "help.settings"));
            items.push(("r", "help.refresh"));
        }
        Screen::LinkStudent(..) => {
            items.push(("Type", "help.type_registration"));
            items.push(("Enter", "help.find_student"));
            items.push(("Backspace", "help.delete_char"));
            items.push(("Esc", "help.cancel"));
        }
        Screen::Fees(..) => {
            items.push(("↑/k ↓/j", "help.select_installment"));
            items.push(("Enter", "help.pay_installment"));
            items.push(("p", "help.pay"));
            items.push(("t", "help.history"));
        }
        Screen::Payment(..) => {
            items.push(("Tab/↓", "help.next_field"));
            items.push(("Shift+Tab/↑", "help.previous_field"));
            items.push(("←/→", "help.change_month"));
            items.push(("Enter", "help.submit_payment"));
            items.push(("r", "help.retry"));
            items.push(("Esc", "help.cancel"));
        }
        Screen::PaymentStatus(..) => {
            items.push(("r", "help.refresh_status"));
            items.push(("Enter", "help.home"));
        }
        Screen::History(..) => {
            items.push(("↑/k ↓/j", "help.select"));
            items.push(("r", "help.refresh"));
        }
        Screen::Settings(..) => {
            items.push(("↑/k ↓/j", "help.select"));
            items.push(("Enter/Space", "help.change_setting"));
            items.push(("Esc", "help.cancel"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "help.scroll_up"));
            items.push(("↓/j", "help.scroll_down"));
            items.push(("PgUp/PgDn", "help.scroll_page"));
            items.push(("Home/End", "help.scroll_ends"));
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("h/←/Esc", "help.back"));
    items.push(("g then d", "help.go_dashboard"));
    items.push(("g then s", "help.go_settings"));
    items.push(("g then l", "help.go_logs"));
    items.push(("g then g", "help.top"));
    items.push(("G", "help.bottom"));
    items.push(("?", "help.toggle"));
    items.push(("q", "help.quit"));

    items
}
