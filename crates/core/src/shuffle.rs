//! Randomised ordering for questions and their options.
//!
//! Every function takes the random source explicitly so callers can seed it.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::Question;

/// Returns a uniformly shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Returns `question` with its options in random order and `answer` remapped
/// to wherever the correct text landed.
pub fn shuffle_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    let mut order: Vec<usize> = (0..question.options().len()).collect();
    order.shuffle(rng);
    permute_options(question, &order)
}

/// Shuffles question order once, then each question's options independently.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    shuffled(questions, rng)
        .iter()
        .map(|q| shuffle_options(q, rng))
        .collect()
}

/// `order[new_position] == original_index`.
fn permute_options(question: &Question, order: &[usize]) -> Question {
    let mut answer = 0;
    let options = order
        .iter()
        .enumerate()
        .map(|(position, &original)| {
            if original == question.answer() {
                answer = position;
            }
            question.options()[original].clone()
        })
        .collect();
    question.reordered(options, answer)
}
