use crate::kinds::FxnType;
use crate::message::Messages;

pub trait Driver {
    fn report(&mut self, messages: Messages);

    /// Called once per checked definition, with `None` if no type could be
    /// given to it.
    fn report_type(&mut self, name: &str, ty: Option<&FxnType>);

    fn done(&mut self) {}
}
