//! Stream shuffling adapter.

use crate::common::*;

/// Shuffle a fallible stream within a bounded buffer.
///
/// Up to `capacity` items are held back and leave the buffer in random
/// order. Errors are passed through as soon as the source yields them.
pub fn shuffle<T, S>(
    stream: S,
    capacity: NonZeroUsize,
    rng: StdRng,
) -> impl Stream<Item = Result<T>> + Send
where
    S: Stream<Item = Result<T>> + Send + Unpin,
    T: Send,
{
    let capacity = capacity.get();

    stream::unfold(
        (stream, Vec::with_capacity(capacity), rng),
        move |(mut stream, mut buffer, mut rng)| async move {
            // top up the buffer
            while buffer.len() < capacity {
                match stream.next().await {
                    Some(Ok(item)) => buffer.push(item),
                    Some(Err(err)) => return Some((Err(err), (stream, buffer, rng))),
                    None => break,
                }
            }

            if buffer.is_empty() {
                return None;
            }
            let index = rng.gen_range(0..buffer.len());
            let item = buffer.swap_remove(index);
            Some((Ok(item), (stream, buffer, rng)))
        },
    )
}
