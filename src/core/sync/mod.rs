/*!
 * Synchronization Primitives
 *
 * - `Semaphore`: counting signal used for the scheduler → writer hand-off,
 *   with an explicit close marking end of stream
 * - `ShutdownFlag`: cooperative completion flag observed at task safe points
 */

mod semaphore;
mod shutdown;

pub use semaphore::{Semaphore, WaitError, WaitResult};
pub use shutdown::ShutdownFlag;
