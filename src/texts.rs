pub static WINDOW_HELP: &str = "pixelsketch - draw on a 16x16 canvas\n\
\n\
Left mouse button\t- draw with the selected tool\n\
P\t- pencil: paint cells while dragging\n\
R\t- rectangle: drag to span a filled rectangle, release to commit\n\
B\t- draw in black\n\
W\t- draw in white (eraser)\n\
S\t- save the canvas as PNG\n\
Esc\t- quit\n";
