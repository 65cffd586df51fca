//! Call forms: one input widget per argument plus the form's focus

use rand::RngCore;

use callpane_core::{
    render_input, IdlValue, InputKind, InputWidget, MethodSignature, ParseMode, RandomConfig,
};

use crate::message::EditOp;

/// A focusable control of a method form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// The argument input at this position
    Input(usize),
    /// The Query/Call button
    Invoke,
    /// The Lucky button
    Lucky,
    /// The result pane
    Result,
}

/// The generated form of one method
#[derive(Debug, Clone)]
pub struct MethodForm {
    pub inputs: Vec<InputWidget>,
    pub focus: FormFocus,
}

impl MethodForm {
    /// Build one input per argument type
    pub fn new(signature: &MethodSignature) -> Self {
        let inputs: Vec<_> = signature.args.iter().map(render_input).collect();
        let mut form = Self {
            inputs,
            focus: FormFocus::Invoke,
        };
        form.focus = form.stops().first().copied().unwrap_or(FormFocus::Invoke);
        form
    }

    /// Parse every input; `None` if any of them rejected its value
    ///
    /// All inputs are parsed even after a rejection so each one shows its
    /// own state.
    pub fn collect(&mut self) -> Option<Vec<IdlValue>> {
        let parsed: Vec<_> = self
            .inputs
            .iter_mut()
            .map(|input| input.parse(ParseMode::Typed))
            .collect();
        parsed.into_iter().collect()
    }

    /// Fill every input with a random value and return the values
    pub fn collect_random(
        &mut self,
        rng: &mut dyn RngCore,
        cfg: &RandomConfig,
    ) -> Option<Vec<IdlValue>> {
        let parsed: Vec<_> = self
            .inputs
            .iter_mut()
            .map(|input| input.parse(ParseMode::Random { rng: &mut *rng, cfg }))
            .collect();
        parsed.into_iter().collect()
    }

    pub fn has_rejection(&self) -> bool {
        self.inputs.iter().any(|input| input.is_rejected())
    }

    /// Focus stops in tab order; inputs with nothing to enter are skipped
    pub fn stops(&self) -> Vec<FormFocus> {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| input.kind != InputKind::Fixed)
            .map(|(i, _)| FormFocus::Input(i))
            .chain([FormFocus::Invoke, FormFocus::Lucky, FormFocus::Result])
            .collect()
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let stops = self.stops();
        let len = stops.len() as isize;
        let current = stops.iter().position(|s| *s == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.focus = stops[next as usize];
    }

    /// The focused input, if focus is on one
    pub fn focused_input(&mut self) -> Option<&mut InputWidget> {
        match self.focus {
            FormFocus::Input(i) => self.inputs.get_mut(i),
            _ => None,
        }
    }

    /// Whether typed characters should go into the focused input
    pub fn is_editing(&self) -> bool {
        match self.focus {
            FormFocus::Input(i) => self.inputs.get(i).is_some_and(|w| w.is_editable()),
            _ => false,
        }
    }

    /// Apply an edit to the focused input; ignored when none is focused
    pub fn edit(&mut self, op: EditOp) {
        let Some(input) = self.focused_input() else {
            return;
        };
        match op {
            EditOp::Insert(c) if input.is_editable() => input.insert(c),
            EditOp::Backspace => input.backspace(),
            EditOp::Delete => input.delete(),
            EditOp::Left => input.move_left(),
            EditOp::Right => input.move_right(),
            EditOp::Home => input.move_home(),
            EditOp::End => input.move_end(),
            EditOp::Toggle if input.kind == InputKind::Toggle => input.toggle(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callpane_core::{parse_interface, IdlType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn signature(src: &str) -> std::sync::Arc<MethodSignature> {
        parse_interface(src).unwrap().methods[0].clone()
    }

    fn type_into(form: &mut MethodForm, index: usize, text: &str) {
        form.focus = FormFocus::Input(index);
        for c in text.chars() {
            form.edit(EditOp::Insert(c));
        }
    }

    #[test]
    fn test_one_input_per_argument() {
        let form = MethodForm::new(&signature("service : { f : (nat, text, bool) -> () }"));
        assert_eq!(form.inputs.len(), 3);
        assert_eq!(form.inputs[0].ty, IdlType::Nat);
        assert_eq!(form.inputs[2].kind, InputKind::Toggle);
        assert_eq!(form.focus, FormFocus::Input(0));
    }

    #[test]
    fn test_no_arguments_focuses_invoke() {
        let form = MethodForm::new(&signature("service : { noop : () -> () }"));
        assert!(form.inputs.is_empty());
        assert_eq!(form.focus, FormFocus::Invoke);
    }

    #[test]
    fn test_collect_parses_typed_values() {
        let mut form = MethodForm::new(&signature("service : { add : (nat, nat) -> (nat) }"));
        type_into(&mut form, 0, "2");
        type_into(&mut form, 1, "3");

        assert_eq!(
            form.collect(),
            Some(vec![IdlValue::Nat(2), IdlValue::Nat(3)])
        );
        assert!(!form.has_rejection());
    }

    #[test]
    fn test_collect_marks_every_rejected_input() {
        let mut form = MethodForm::new(&signature("service : { add : (nat, nat) -> (nat) }"));
        type_into(&mut form, 0, "-1");

        assert_eq!(form.collect(), None);
        assert!(form.inputs[0].is_rejected());
        // Empty and required
        assert!(form.inputs[1].is_rejected());
    }

    #[test]
    fn test_collect_random_fills_inputs() {
        let mut form = MethodForm::new(&signature("service : { f : (nat8, text) -> () }"));
        let mut rng = StdRng::seed_from_u64(1);

        let values = form
            .collect_random(&mut rng, &RandomConfig::default())
            .unwrap();
        assert_eq!(values.len(), 2);
        assert!(!form.inputs[0].buffer().is_empty());

        // What Lucky wrote parses back to the same value
        assert_eq!(form.collect(), Some(values));
    }

    #[test]
    fn test_focus_cycles_through_stops() {
        let mut form = MethodForm::new(&signature("service : { f : (null, nat) -> () }"));
        // `null` has nothing to enter and is skipped
        assert_eq!(form.focus, FormFocus::Input(1));

        form.focus_next();
        assert_eq!(form.focus, FormFocus::Invoke);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Lucky);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Result);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Input(1));
        form.focus_previous();
        assert_eq!(form.focus, FormFocus::Result);
    }

    #[test]
    fn test_toggle_only_affects_checkboxes() {
        let mut form = MethodForm::new(&signature("service : { f : (bool, nat) -> () }"));
        form.focus = FormFocus::Input(0);
        form.edit(EditOp::Toggle);
        assert!(form.inputs[0].is_checked());
        assert!(!form.is_editing());

        form.focus = FormFocus::Input(1);
        assert!(form.is_editing());
        form.edit(EditOp::Toggle);
        assert_eq!(form.inputs[1].buffer(), "");
    }

    #[test]
    fn test_edit_without_focused_input_is_ignored() {
        let mut form = MethodForm::new(&signature("service : { f : (nat) -> () }"));
        form.focus = FormFocus::Lucky;
        form.edit(EditOp::Insert('7'));
        assert_eq!(form.inputs[0].buffer(), "");
    }
}
