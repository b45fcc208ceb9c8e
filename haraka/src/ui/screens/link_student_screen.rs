use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::i18n::Locale;
use crate::state::{LinkStudentState, LoadingState};
use crate::ui::{
    components::{help_bar, screen_title, text_input},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &LinkStudentState, locale: &Locale) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, locale.t("link.title"), &state.loading);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(theme::INPUT_HEIGHT),
            Constraint::Min(0),
        ])
        .split(content_area);

    let intro = Paragraph::new(locale.t("link.instructions"))
        .style(theme::help_text_style())
        .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[0]);

    text_input::render_text_input(
        f,
        chunks[1],
        locale.t("link.registration_number"),
        &state.input,
        !state.loading.is_loading() && state.found.is_none(),
    );

    if state.loading.is_loading() {
        let searching = Paragraph::new(Span::styled(
            locale.t("link.searching"),
            theme::loading_style(),
        ));
        f.render_widget(searching, chunks[2]);
    } else if let LoadingState::Error(ref message) = state.loading {
        let error = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(theme::COLOR_NEGATIVE),
        ))
        .wrap(Wrap { trim: true });
        f.render_widget(error, chunks[2]);
    }

    help_bar::render_help_bar(
        f,
        help_area,
        &help_bar::hints(locale, &[("Enter", "hint.find"), ("Esc", "hint.cancel")]),
    );
}
