pub mod button;
pub mod cycle_field;
pub mod date_input;
pub mod help_bar;
pub mod item_row;
pub mod modal;
pub mod task_detail;
pub mod task_form;
pub mod task_list;
pub mod text_input;
pub mod timeline_view;

pub use button::Button;
pub use cycle_field::CycleField;
pub use date_input::{DateInput, DateMode};
pub use help_bar::HelpContext;
pub use modal::Modal;
pub use task_detail::TaskDetail;
pub use task_form::{FormField, FormOutcome, TaskDraft, TaskForm};
pub use task_list::TaskList;
pub use text_input::TextInput;
pub use timeline_view::{Bucket, TimelineView};
