//! GTK4 shell: range selector, refresh button, status line and a scrollable
//! drawing area showing the last dashboard pass.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{DashboardComposer, DashboardSession, DateRangeSelection, RenderedDashboard};
use crate::error::DashboardError;
use crate::fetch::SeriesFetcher;
use crate::render::{Color, draw_frame};

const APPLICATION_ID: &str = "rs.econ_dash.dashboard";

/// Couples a [`DashboardSession`] with the widgets that display it.
pub struct GtkDashboardAdapter<F: SeriesFetcher + 'static> {
    session: Rc<RefCell<DashboardSession<'static, F>>>,
    drawing_area: gtk::DrawingArea,
    status: gtk::Label,
}

impl<F: SeriesFetcher + 'static> GtkDashboardAdapter<F> {
    #[must_use]
    pub fn new(session: DashboardSession<'static, F>) -> Rc<Self> {
        let viewport = session.composer().viewport();
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        let status = gtk::Label::new(None);
        status.set_xalign(0.0);
        status.set_wrap(true);
        status.set_selectable(true);

        let adapter = Rc::new(Self {
            session: Rc::new(RefCell::new(session)),
            drawing_area,
            status,
        });

        let session = Rc::clone(&adapter.session);
        adapter
            .drawing_area
            .set_draw_func(move |_area, context, _width, _height| {
                let session = session.borrow();
                let Some(Ok(dashboard)) = session.current() else {
                    return;
                };
                if let Err(err) = draw_frame(context, &dashboard.frame, Color::rgb(1.0, 1.0, 1.0)) {
                    warn!(error = %err, "failed to paint dashboard frame");
                }
            });

        adapter
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn status_label(&self) -> &gtk::Label {
        &self.status
    }

    pub fn refresh(&self) {
        let message = {
            let mut session = self.session.borrow_mut();
            status_text(session.refresh())
        };
        self.show(&message);
    }

    pub fn select(&self, selection: DateRangeSelection) {
        let message = {
            let mut session = self.session.borrow_mut();
            if session.selection() == selection && session.current().is_some() {
                return;
            }
            status_text(session.select(selection))
        };
        self.show(&message);
    }

    fn show(&self, message: &str) {
        self.status.set_text(message);
        self.drawing_area.queue_draw();
    }
}

fn status_text(result: &Result<RenderedDashboard, DashboardError>) -> String {
    match result {
        Ok(dashboard) => {
            let mut lines: Vec<String> = dashboard.date_range_line().into_iter().collect();
            lines.extend(dashboard.warnings().map(ToString::to_string));
            lines.join("\n")
        }
        Err(err) => err.banner(),
    }
}

/// Opens the dashboard window and blocks until it closes.
///
/// The first pass runs on activation with `initial`; toggling the range
/// selector or pressing "Refresh Data" reruns the whole pass.
pub fn run_dashboard_window<F>(
    composer: DashboardComposer<'static, F>,
    initial: DateRangeSelection,
) -> glib::ExitCode
where
    F: SeriesFetcher + 'static,
{
    let app = gtk::Application::builder()
        .application_id(APPLICATION_ID)
        .build();

    let pending = Rc::new(RefCell::new(Some(composer)));
    app.connect_activate(move |app| {
        let Some(composer) = pending.borrow_mut().take() else {
            return;
        };
        let adapter = GtkDashboardAdapter::new(DashboardSession::new(composer, initial));

        let controls = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let mut group_leader: Option<gtk::CheckButton> = None;
        for selection in DateRangeSelection::ALL {
            let radio = gtk::CheckButton::with_label(selection.label());
            if let Some(leader) = &group_leader {
                radio.set_group(Some(leader));
            }
            radio.set_active(selection == initial);
            let adapter = Rc::clone(&adapter);
            radio.connect_toggled(move |radio| {
                if radio.is_active() {
                    adapter.select(selection);
                }
            });
            controls.append(&radio);
            group_leader.get_or_insert(radio);
        }

        let refresh_button = gtk::Button::with_label("Refresh Data");
        {
            let adapter = Rc::clone(&adapter);
            refresh_button.connect_clicked(move |_| adapter.refresh());
        }
        controls.append(&refresh_button);

        let scroller = gtk::ScrolledWindow::builder()
            .child(adapter.drawing_area())
            .vexpand(true)
            .hexpand(true)
            .build();

        let layout = gtk::Box::new(gtk::Orientation::Vertical, 6);
        layout.append(&controls);
        layout.append(adapter.status_label());
        layout.append(&scroller);

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("Economic Data Visualization (FRED Data)")
            .default_width(1280)
            .default_height(900)
            .build();
        window.set_child(Some(&layout));
        window.present();

        adapter.refresh();
    });

    app.run_with_args::<&str>(&[])
}
